mod source;

pub(crate) const NODES_CSV: &str = "\
id,name,category,pretty_category,state_abbrv,lcc,x,y
a,Alpha,private,Private-ish,IL,1,-100,0
b,Bravo,leo,LEOs,IL,1,0,50
c,Charlie,haven,Havens,NY,1,100,-20
d,Delta,booster,Boosters,CA,1,40,10
e,Echo,connector,Connectors,,0,-80,5
f,Foxtrot,leo,LEOs,TX,0,-60,-5
";

pub(crate) const EDGES_CSV: &str = "\
source,target,amount,logamount,count
a,b,1000,3.0,2
a,b,500,2.69897,1
c,b,2500,3.39794,1
d,b,100,2.0,1
a,d,50,1.69897,1
e,f,10,1.0,1
";
